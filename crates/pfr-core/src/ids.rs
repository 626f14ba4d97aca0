use core::fmt;
use core::num::NonZeroU64;

/// Identifier of one triggered simulation request.
///
/// - ids are issued in strictly increasing order by [`RequestIdGen`]
/// - `NonZero` keeps `Option<RequestId>` the same size as `RequestId`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(NonZeroU64);

impl RequestId {
    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({})", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of request ids, one per controller.
#[derive(Debug, Default)]
pub struct RequestIdGen {
    last: u64,
}

impl RequestIdGen {
    pub fn next_id(&mut self) -> RequestId {
        self.last = self.last.saturating_add(1);
        RequestId(NonZeroU64::new(self.last).unwrap_or(NonZeroU64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_strictly_increasing() {
        let mut ids = RequestIdGen::default();
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!(a.get(), 1);
        assert!(a < b && b < c);
        assert_eq!(format!("{c}"), "#3");
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<RequestId>(),
            core::mem::size_of::<Option<RequestId>>()
        );
    }
}

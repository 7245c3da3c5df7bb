//! Strongly-typed opaque handles and identifiers.

use std::fmt;
use std::num::NonZeroU32;

/// Opaque external handle to an object in the object table.
///
/// The raw value is `table index + 1`; raw value `0` is reserved as the
/// invalid handle and is unrepresentable here, so `Option<ObjectHandle>`
/// costs no extra space. Handles are stable for an object's whole lifetime,
/// including across an in-place kind transition (e.g. a window under
/// construction becoming a realized window).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(NonZeroU32);

impl ObjectHandle {
    /// Build a handle from a table slot index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is `u32::MAX` (the only index whose `+1` wraps).
    /// The table can never reach that many slots in practice.
    pub fn from_index(index: u32) -> Self {
        let raw = index.checked_add(1).expect("object table index overflow");
        // raw >= 1 by construction.
        Self(NonZeroU32::new(raw).expect("index + 1 is nonzero"))
    }

    /// Reconstruct a handle from its raw integer form.
    ///
    /// Returns `None` for the reserved value `0`, which callers should
    /// surface as [`UsageError::NullHandle`](crate::error::UsageError).
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The table slot index this handle refers to.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// The raw integer form handed across the API boundary.
    pub fn raw(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.get())
    }
}

/// Opaque backend-owned resource word.
///
/// Stored in complete object records and never interpreted by this
/// substrate — the windowing backend packs whatever it needs (a pointer,
/// an XID, an SDL window id) into the word and gets it back verbatim.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BackendRef(pub u64);

impl fmt::Display for BackendRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl From<u64> for BackendRef {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Event timestamp in milliseconds, supplied by the event producer.
///
/// The substrate never reads a clock itself; backends stamp events with
/// whatever monotonic time base they use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventTimestamp(pub i64);

impl fmt::Display for EventTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EventTimestamp {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_is_index_plus_one() {
        let h = ObjectHandle::from_index(0);
        assert_eq!(h.raw(), 1);
        assert_eq!(h.index(), 0);

        let h = ObjectHandle::from_index(41);
        assert_eq!(h.raw(), 42);
        assert_eq!(h.index(), 41);
    }

    #[test]
    fn from_raw_rejects_zero() {
        assert!(ObjectHandle::from_raw(0).is_none());
        assert_eq!(ObjectHandle::from_raw(1).unwrap().index(), 0);
    }

    #[test]
    fn option_handle_is_word_sized() {
        assert_eq!(
            std::mem::size_of::<Option<ObjectHandle>>(),
            std::mem::size_of::<u32>()
        );
    }

    #[test]
    fn round_trip_through_raw() {
        let h = ObjectHandle::from_index(7);
        assert_eq!(ObjectHandle::from_raw(h.raw()), Some(h));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn index_round_trips(index in 0u32..u32::MAX) {
                let h = ObjectHandle::from_index(index);
                prop_assert_eq!(h.index(), index);
                prop_assert_eq!(h.raw(), index + 1);
                prop_assert_eq!(ObjectHandle::from_raw(h.raw()), Some(h));
            }

            #[test]
            fn from_raw_accepts_exactly_nonzero(raw in proptest::num::u32::ANY) {
                prop_assert_eq!(ObjectHandle::from_raw(raw).is_some(), raw != 0);
            }
        }
    }
}

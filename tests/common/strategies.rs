use errhandler_core::RawStatus;
use proptest::prelude::*;

/// Strategy for any error code value the binding boundary can carry
pub fn error_code_value_strategy() -> impl Strategy<Value = i32> {
    prop_oneof![
        0i32..=64,
        Just(i32::MIN),
        Just(i32::MAX),
        any::<i32>(),
    ]
}

/// Strategy for completion statuses, biased towards success
pub fn status_strategy() -> impl Strategy<Value = RawStatus> {
    prop_oneof![
        3 => Just(RawStatus::SUCCESS),
        1 => (1i32..=64).prop_map(RawStatus::new),
        1 => (-64i32..=-1).prop_map(RawStatus::new),
    ]
}

/// Strategy for a request array: `None` is a null request slot
pub fn request_slots_strategy() -> impl Strategy<Value = Vec<Option<RawStatus>>> {
    prop::collection::vec(prop::option::weighted(0.8, status_strategy()), 0..16)
}

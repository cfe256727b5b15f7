use slotmap::new_key_type;
use std::sync::atomic::{AtomicU64, Ordering};

new_key_type! {
    pub(crate) struct MonomerKey;
    pub(crate) struct CompartmentKey;
    pub(crate) struct ParameterKey;
    pub(crate) struct RuleKey;
}

/// Identity of one model instance, unique within the process.
///
/// Every id handed out by a model carries the model's identity, so an id can only
/// resolve in the model that issued it (or a clone of that model).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelUid(u64);

impl ModelUid {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

macro_rules! model_scoped_id {
    ($(#[$meta:meta])* $name:ident => $key:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            model: ModelUid,
            key: $key,
        }

        impl $name {
            pub(crate) fn new(model: ModelUid, key: $key) -> Self {
                Self { model, key }
            }

            /// The model that issued this id.
            pub fn model(&self) -> ModelUid {
                self.model
            }

            pub(crate) fn key(&self) -> $key {
                self.key
            }
        }
    };
}

model_scoped_id!(MonomerId => MonomerKey);
model_scoped_id!(CompartmentId => CompartmentKey);
model_scoped_id!(ParameterId => ParameterKey);
model_scoped_id!(RuleId => RuleKey);

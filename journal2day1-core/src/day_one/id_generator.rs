use uuid::Uuid;

/// Source of entry identifiers. Swapped out in tests for a predictable sequence.
pub trait IdGenerator {
    fn next_id(&mut self) -> Uuid;
}

/// Random (v4) identifiers; the default.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

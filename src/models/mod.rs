pub mod enums;
pub mod patient_id;
pub mod summary;
pub mod symptom;

pub use enums::*;
pub use patient_id::*;
pub use summary::*;
pub use symptom::*;

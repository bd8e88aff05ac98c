pub mod training;
pub mod training_role;

pub use training::Entity as Training;
pub use training_role::Entity as TrainingRole;

pub mod m202610160001_create_trainings;
pub mod m202610160002_create_training_roles;

pub use super::submissions::Entity as Submissions;

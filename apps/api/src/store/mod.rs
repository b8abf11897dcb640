// Persistence layer: plain-SQL access functions over the three tables.
// Any write touching more than one row runs inside a transaction.

pub mod applications;
pub mod cache;
pub mod resumes;
pub mod users;

// Infrastructure layer module
// PostgreSQL and in-memory adapters behind the domain repository traits

pub mod repositories;

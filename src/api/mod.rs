pub mod career;
pub mod employee;
pub mod job;
pub mod mail_request;
pub mod project;

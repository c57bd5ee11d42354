//! Jenkins Connect - headless connect front end for the Jenkins-for-Jira
//! integration
//!
//! The root crate owns the bridge protocol and its runner; the domain
//! model lives in `jconnect-core` and the application layer in
//! `jconnect-app`.

pub mod bridge;

pub use bridge::runner::run;

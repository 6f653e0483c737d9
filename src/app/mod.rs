// Application layer: the form-facing side that drives the requester.

pub mod session;

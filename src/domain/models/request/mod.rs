pub mod request_actor;

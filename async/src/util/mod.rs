pub mod maybe_send;

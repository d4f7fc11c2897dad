pub mod local_tokens;

mod common;
mod postgrest;

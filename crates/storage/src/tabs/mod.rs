#![forbid(unsafe_code)]

mod activate;
mod create;
mod delete;
mod edit;
mod query;
mod relocate;

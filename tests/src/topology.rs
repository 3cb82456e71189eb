mod integration;
mod snapshot;

//! Integration tests for the topology pipeline.

#[cfg(test)]
mod lab;
#[cfg(test)]
mod topology;

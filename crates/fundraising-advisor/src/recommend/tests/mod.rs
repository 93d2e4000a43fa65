mod common;
mod ensemble;
mod rules;
mod scoring;

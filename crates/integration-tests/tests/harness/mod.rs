#![allow(dead_code)]

pub mod collaborator;

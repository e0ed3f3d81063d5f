#![cfg(test)]

//! Unit-test bootstrap helpers.

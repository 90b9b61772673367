//! Integration tests: the mantis-rotate binary against a fake Mantis instance

mod test_rotate;

pub mod pollinations;

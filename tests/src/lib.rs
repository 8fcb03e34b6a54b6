//! Workspace integration tests. Everything here runs against the public
//! surface of frontr-core and frontr-common, with real sockets where the
//! behavior allows for it and injected dialers where it does not.
#![cfg(test)]

mod discovery;
mod util;

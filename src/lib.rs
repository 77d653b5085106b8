//! A small vein-dispatching script runner.
//!
//! Scripts declare the language runtime that should execute them (their
//! "vein") either in a shebang line of the form
//! `#!/usr/bin/env -S fragletc --vein=<identifier>` or via an explicit
//! `--vein` flag. This crate resolves the vein, looks up the bound runtime
//! command in a [`VeinRegistry`], and runs the script through it with stdin,
//! stdout and stderr passed straight through, relaying the child's exit code.
//!
//! The main entry point is [`Dispatcher`], which takes the registry by
//! reference so dispatch calls stay independently testable. The [`registry`],
//! [`shebang`] and [`config`] modules expose the building blocks: the vein
//! table, the pure shebang parser, and the optional veins-file loader.
//!
//! Exit-code contract of the `fragletc` binary: a script that runs has its
//! own exit code relayed verbatim; failures inside the dispatcher exit with
//! [`dispatch::DISPATCH_FAILURE`] and a `fragletc: error:` diagnostic on
//! stderr, never on stdout.

pub mod config;
pub mod dispatch;
pub mod registry;
pub mod shebang;

/// Convenient re-exports of the types most callers need.
///
/// See [`Dispatcher`] for the high-level API.
pub use dispatch::{DispatchError, Dispatcher, ExitCode};
pub use registry::{RuntimeBinding, VeinRegistry};

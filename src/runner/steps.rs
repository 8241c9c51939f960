//! The CI setup steps

use std::fmt;

/// One named unit of setup work backed by an external script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Script file name inside the scripts directory
    pub script: &'static str,
    /// Human readable description printed in the markers
    pub name: &'static str,
}

impl Step {
    pub const fn new(script: &'static str, name: &'static str) -> Self {
        Self { script, name }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.script)
    }
}

/// Every step of the CI preparation, in execution order
pub const STEPS: &[Step] = &[
    Step::new("dump-environment.sh", "Show the current environment"),
    Step::new("install-sccache.sh", "Install sccache"),
    Step::new("install-clang.sh", "Install clang"),
    Step::new("switch-xcode.sh", "Switch to Xcode 9.3"),
    Step::new("install-wix.sh", "Install WIX"),
    Step::new("install-innosetup.sh", "Install InnoSetup"),
    Step::new(
        "windows-symlink-build-dir.sh",
        "Ensure the build happens on C:\\ instead of D:\\",
    ),
    Step::new(
        "disable-git-crlf-conversion.sh",
        "Disable git automatic line ending conversion (on C:\\)",
    ),
    Step::new("install-msys2.sh", "Install msys2"),
    Step::new("install-mingw.sh", "Install MinGW"),
    Step::new("install-ninja.sh", "Install ninja"),
    Step::new("enable-docker-ipv6.sh", "Enable IPv6 on Docker"),
    // Something while installing dependencies on Windows switches the git
    // configuration directory or re-enables autocrlf, so turn it off again
    // before the submodules are checked out.
    Step::new(
        "disable-git-crlf-conversion.sh",
        "Disable git automatic line ending conversion",
    ),
    Step::new("checkout-submodules.sh", "Checkout submodules"),
    Step::new("verify-line-endings.sh", "Verify line endings"),
    Step::new("install-awscli.sh", "Install awscli"),
];

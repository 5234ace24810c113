//! Platform support history of the Go toolchain.
//!
//! Each step lists the ports a release added (with their default flag) and
//! the ports it dropped, relative to the release before it. A port re-added
//! with a different flag updates that flag.

/// `(os, arch, default)`
pub(super) type Port = (&'static str, &'static str, bool);

/// One step of the history.
pub(super) struct Release {
    /// First version carrying this platform set.
    pub since: (u64, u64),
    pub add: &'static [Port],
    pub drop: &'static [Port],
}

pub(super) const HISTORY: &[Release] = &[
    Release {
        since: (1, 0),
        add: &[
            ("darwin", "386", true),
            ("darwin", "amd64", true),
            ("linux", "386", true),
            ("linux", "amd64", true),
            ("linux", "arm", true),
            ("freebsd", "386", true),
            ("freebsd", "amd64", true),
            ("openbsd", "386", true),
            ("openbsd", "amd64", true),
            ("windows", "386", true),
            ("windows", "amd64", true),
        ],
        drop: &[],
    },
    Release {
        since: (1, 1),
        add: &[
            ("freebsd", "arm", true),
            ("netbsd", "386", true),
            ("netbsd", "amd64", true),
            ("netbsd", "arm", true),
            ("plan9", "386", false),
        ],
        drop: &[],
    },
    Release {
        since: (1, 3),
        add: &[
            ("dragonfly", "386", false),
            ("dragonfly", "amd64", false),
            ("nacl", "amd64", false),
            ("nacl", "amd64p32", false),
            ("nacl", "arm", false),
            ("solaris", "amd64", false),
        ],
        drop: &[],
    },
    Release {
        since: (1, 4),
        add: &[("android", "arm", false), ("plan9", "amd64", false)],
        drop: &[],
    },
    Release {
        since: (1, 5),
        add: &[
            ("darwin", "arm", false),
            ("darwin", "arm64", false),
            ("linux", "arm64", false),
            ("linux", "ppc64", false),
            ("linux", "ppc64le", false),
        ],
        drop: &[],
    },
    Release {
        since: (1, 6),
        add: &[
            ("android", "386", false),
            ("android", "amd64", false),
            ("linux", "mips64", false),
            ("linux", "mips64le", false),
            ("nacl", "386", false),
            ("openbsd", "arm", true),
        ],
        drop: &[],
    },
    Release {
        since: (1, 7),
        add: &[
            // not fully supported, but generally useful
            ("linux", "s390x", true),
            ("plan9", "arm", false),
            // mips64 ports reached full support
            ("linux", "mips64", true),
            ("linux", "mips64le", true),
        ],
        drop: &[],
    },
    Release {
        since: (1, 8),
        add: &[("linux", "mips", true), ("linux", "mipsle", true)],
        drop: &[],
    },
    Release {
        since: (1, 9),
        add: &[],
        drop: &[],
    },
    Release {
        // unannounced
        since: (1, 10),
        add: &[],
        drop: &[("android", "amd64", false)],
    },
    Release {
        since: (1, 11),
        add: &[("js", "wasm", true)],
        drop: &[],
    },
    Release {
        since: (1, 12),
        add: &[("aix", "ppc64", false), ("windows", "arm", true)],
        drop: &[],
    },
    Release {
        since: (1, 13),
        add: &[
            ("illumos", "amd64", false),
            ("netbsd", "arm64", true),
            ("openbsd", "arm64", true),
        ],
        drop: &[],
    },
    Release {
        since: (1, 14),
        add: &[("freebsd", "arm64", true), ("linux", "riscv64", true)],
        drop: &[
            ("nacl", "386", false),
            ("nacl", "amd64", false),
            ("nacl", "arm", false),
        ],
    },
    Release {
        since: (1, 15),
        add: &[("android", "arm64", false)],
        drop: &[("darwin", "386", false)],
    },
    Release {
        since: (1, 16),
        add: &[
            ("android", "amd64", false),
            ("darwin", "arm64", true),
            ("openbsd", "mips64", false),
        ],
        drop: &[],
    },
    Release {
        since: (1, 17),
        add: &[("windows", "arm64", true)],
        drop: &[],
    },
    Release {
        since: (1, 18),
        add: &[],
        drop: &[],
    },
    Release {
        since: (1, 19),
        add: &[("linux", "loong64", true)],
        drop: &[],
    },
    Release {
        since: (1, 20),
        add: &[("freebsd", "riscv64", true)],
        drop: &[],
    },
    Release {
        since: (1, 21),
        add: &[("android", "386", false), ("android", "arm", false)],
        drop: &[],
    },
    Release {
        since: (1, 22),
        add: &[],
        drop: &[],
    },
    Release {
        since: (1, 23),
        add: &[],
        drop: &[],
    },
];

//! The csp-split command-line executable.

fn main() -> anyhow::Result<()> {
    csp_split::run()
}

fn main() -> anyhow::Result<()> {
    glbpress::cli::run_cli()
}

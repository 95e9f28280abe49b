fn main() -> miette::Result<()> {
    yaml_xref::cli::run()
}

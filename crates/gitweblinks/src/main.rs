fn main() -> anyhow::Result<()> {
    gitweblinks::init();
    gitweblinks::cli::run()
}

fn main() -> anyhow::Result<()> {
    stoat_desktop::run()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    chart_study_lib::run()
}

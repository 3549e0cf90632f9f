use ring_emitter::run;

fn main() -> anyhow::Result<()> {
    run()
}

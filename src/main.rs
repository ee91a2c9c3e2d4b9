fn main() -> anyhow::Result<()> {
    paced_crawl::entrypoint()
}

pub mod args;
pub mod graph;
pub mod logger;
pub mod pacing;
pub mod routines;
pub mod traversal;

use anyhow::Result;
use args::*;
use clap::Parser;
use graph::{GraphCrawler, LinkGraph};
use log::info;
use pacing::{DelayRange, Pacer, RandomPacer};
use routines::*;
use traversal::PacedTraversal;

pub fn entrypoint() -> Result<()> {
    let args = Args::parse();
    logger::init();

    let range = DelayRange::new(args.min_delay, args.max_delay)?;
    let mut pacer = match args.seed {
        Some(seed) => RandomPacer::seeded(range, seed),
        None => RandomPacer::from_entropy(range),
    };

    match args.command {
        Commands::Sample { count } => {
            for _ in 0..count {
                println!("{:.3}", pacer.next_delay().as_secs_f64());
            }
            Ok(())
        }
        Commands::Crawl {
            graph,
            root,
            max_depth,
            allow_outside,
            fail_fast,
        } => {
            let crawler = GraphCrawler::new(LinkGraph::load(&graph)?, root.clone())
                .max_depth(max_depth)
                .prevent_outside(!allow_outside)
                .continue_on_failure(!fail_fast);
            let traversal = PacedTraversal::new(crawler, pacer);
            let pages = match args.mode {
                Mode::Blocking => crawl_loop(&traversal, &root)?,
                Mode::Cooperative => {
                    let (tx, rx) = smol::channel::bounded::<()>(1);
                    ctrlc::set_handler(move || {
                        let _ = tx.try_send(());
                    })?;
                    smol::block_on(crawl_loop_async(&traversal, &root, rx))?
                }
            };
            for page in &pages {
                println!("{page}");
            }
            info!("Crawled {} pages from {root}", pages.len());
            Ok(())
        }
    }
}

//! Deal a deck from a fixed pool until it runs dry, then draw weighted picks.
//!
//! With `replace = false` and `mutate = true` every hand is removed from the
//! pool for good; once the pool is empty the sampler returns `None`.

use tsubo::{Config, Options, Sampler};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let deck: Vec<String> = ["A", "K", "Q", "J", "10", "9", "8"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut dealer = Sampler::with_population(
        deck,
        Config::new()
            .with_seed(329)
            .with_size(3)
            .with_replace(false)
            .with_mutate(true),
    )?;
    println!("seed: {}", dealer.seed());

    let mut hand = 1;
    loop {
        let remaining = dealer.pool().map_or(0, <[String]>::len);
        match dealer.draw_with(&Options::new().with_size(remaining.min(3)))? {
            Some(cards) => println!("hand {hand}: {cards:?}"),
            None => {
                println!("pool exhausted after {} hands", hand - 1);
                break;
            }
        }
        hand += 1;
    }

    let mut picker = Sampler::new(Config::new().with_seed(321))?;
    let weighted = picker.sample_with(
        &["common", "uncommon", "rare"],
        &Options::new()
            .with_size(10)
            .with_probs(vec![0.7, 0.25, 0.05]),
    )?;
    println!("weighted picks: {weighted:?}");

    Ok(())
}

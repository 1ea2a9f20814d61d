use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use recommender::{
    Neighbor, Recommender, RecommenderConfig, RecommenderError, SharedRecommender, UserId,
    WeightingScheme,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::info;

/// Watched titles shown before the list is cut off
const MAX_WATCHED_DISPLAYED: usize = 20;

/// MovieRecs - k-nearest-neighbor movie recommender
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Movie recommendations from users with similar rating behavior", long_about = None)]
struct Cli {
    /// Ratings table (CSV with `user id,movie title,rating`)
    #[arg(short, long, default_value = "data/refined_dataset.csv")]
    data: PathBuf,

    /// Load a saved index instead of training from the ratings table
    #[arg(short, long)]
    index: Option<PathBuf>,

    /// JSON file with recommender settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the neighbor weighting scheme
    #[arg(long, value_enum)]
    weighting: Option<Weighting>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Weighting {
    /// Weight neighbors by raw cosine distance
    Distance,
    /// Weight neighbors by cosine similarity
    Similarity,
}

impl From<Weighting> for WeightingScheme {
    fn from(value: Weighting) -> Self {
        match value {
            Weighting::Distance => WeightingScheme::Distance,
            Weighting::Similarity => WeightingScheme::Similarity,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the movies a user has rated
    Seen {
        #[arg(long)]
        user_id: UserId,
    },

    /// List the users closest to a user
    Similar {
        #[arg(long)]
        user_id: UserId,

        /// Number of similar users (defaults to the configured value)
        #[arg(short, long)]
        k: Option<usize>,
    },

    /// Recommend movies the user has not seen
    Recommend {
        #[arg(long)]
        user_id: UserId,

        /// Number of similar users to consider
        #[arg(short, long)]
        k: Option<usize>,

        /// Number of movies to recommend
        #[arg(short, long)]
        n: Option<usize>,
    },

    /// Watched movies, similar users and recommendations in one report
    Show {
        #[arg(long)]
        user_id: UserId,

        #[arg(short, long)]
        k: Option<usize>,

        #[arg(short, long)]
        n: Option<usize>,
    },

    /// Train the index and save it for later `--index` runs
    BuildIndex {
        /// Where to write the index
        #[arg(short, long, default_value = "model/knn_model.json")]
        output: PathBuf,
    },

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RecommenderConfig::from_json_file(path)?,
        None => RecommenderConfig::default(),
    };
    if let Some(weighting) = cli.weighting {
        config = config.with_weighting(weighting.into());
    }

    let start = Instant::now();
    let recommender = load_recommender(&cli, config)?;
    let (users, movies, ratings) = recommender.matrix().counts();
    println!(
        "{} Loaded {} users, {} movies, {} ratings in {:?}",
        "✓".green(),
        users,
        movies,
        ratings,
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Seen { user_id } => handle_seen(&recommender, user_id)?,
        Commands::Similar { user_id, k } => {
            let k = k.unwrap_or(recommender.config().default_neighbors);
            handle_similar(&recommender, user_id, k)?
        }
        Commands::Recommend { user_id, k, n } => {
            let k = k.unwrap_or(recommender.config().default_neighbors);
            let n = n.unwrap_or(recommender.config().default_recommendations);
            handle_recommend(&recommender, user_id, k, n)?
        }
        Commands::Show { user_id, k, n } => {
            let k = k.unwrap_or(recommender.config().default_neighbors);
            let n = n.unwrap_or(recommender.config().default_recommendations);
            handle_show(&recommender, user_id, k, n)?
        }
        Commands::BuildIndex { output } => handle_build_index(&recommender, &output)?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(recommender, requests, concurrent).await?,
    }

    Ok(())
}

/// Train from the CSV, or load a saved index when `--index` is given
fn load_recommender(cli: &Cli, config: RecommenderConfig) -> Result<Recommender> {
    match &cli.index {
        Some(path) => {
            println!("Loading saved index from {}...", path.display());
            let recommender = Recommender::from_saved_index(path, config)
                .context("Failed to load saved index")?;
            info!("Snapshot ready: {} users", recommender.matrix().n_users());
            Ok(recommender)
        }
        None => {
            println!("Loading ratings table from {}...", cli.data.display());
            let recommender =
                Recommender::from_csv(&cli.data, config).context("Failed to load ratings table")?;
            info!("Snapshot ready: {} users", recommender.matrix().n_users());
            Ok(recommender)
        }
    }
}

/// Turn "user not found" into the message the front-end shows
fn user_facing(err: RecommenderError, user_id: UserId) -> anyhow::Error {
    if err.is_not_found() {
        anyhow!("User {} not found", user_id)
    } else {
        err.into()
    }
}

/// Handle the 'seen' command
fn handle_seen(recommender: &Recommender, user_id: UserId) -> Result<()> {
    let watched = recommender
        .movies_seen_by(user_id)
        .map_err(|e| user_facing(e, user_id))?;
    print_watched(&watched);
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(recommender: &Recommender, user_id: UserId, k: usize) -> Result<()> {
    let similar = recommender
        .similar_users(user_id, k)
        .map_err(|e| user_facing(e, user_id))?;
    print_similar(&similar);
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(recommender: &Recommender, user_id: UserId, k: usize, n: usize) -> Result<()> {
    let recommendations = recommender
        .recommend(user_id, k, n)
        .map_err(|e| user_facing(e, user_id))?;
    print_recommendations(&recommendations);
    Ok(())
}

/// Handle the 'show' command
fn handle_show(recommender: &Recommender, user_id: UserId, k: usize, n: usize) -> Result<()> {
    if !recommender.contains_user(user_id) {
        return Err(anyhow!("User {} not found", user_id));
    }
    handle_seen(recommender, user_id)?;
    handle_similar(recommender, user_id, k)?;
    handle_recommend(recommender, user_id, k, n)
}

/// Handle the 'build-index' command
fn handle_build_index(recommender: &Recommender, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    recommender
        .index()
        .save(output)
        .context("Failed to save index")?;
    println!("{} Model saved successfully to {}", "✓".green(), output.display());
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    recommender: Recommender,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("Benchmark needs at least one request"));
    }
    let k = recommender.config().default_neighbors;
    let n = recommender.config().default_recommendations;
    let user_ids = recommender.matrix().user_ids().to_vec();
    let shared = Arc::new(SharedRecommender::new(recommender));
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    let bench_start = Instant::now();
    let mut handles = vec![];
    for _ in 0..requests {
        let user_id = user_ids[rand::random::<u32>() as usize % user_ids.len()];
        let shared = Arc::clone(&shared);
        let permits = Arc::clone(&permits);
        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let snapshot = shared.current();
            // Scoring is CPU-bound, keep it off the async workers
            tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                snapshot.recommend(user_id, k, n)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            })
            .await?
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        timings.push(handle.await??);
    }
    let wall_time = bench_start.elapsed();

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];

    println!("{}", "Benchmark results:".bold().blue());
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!(
        "Throughput: {:.2} requests/second",
        requests as f32 / wall_time.as_secs_f32()
    );

    Ok(())
}

fn print_watched(watched: &[String]) {
    println!(
        "{}",
        format!("Movies Watched by User (max {} movies displayed)", MAX_WATCHED_DISPLAYED)
            .bold()
            .blue()
    );
    if watched.is_empty() {
        println!("No movies watched");
        return;
    }
    for title in watched.iter().take(MAX_WATCHED_DISPLAYED) {
        println!("{}{}", "• ".green(), title);
    }
}

fn print_similar(similar: &[Neighbor]) {
    println!("{}", "Similar Users".bold().blue());
    if similar.is_empty() {
        println!("No similar users found");
        return;
    }
    println!("{:>8}  {}", "User ID", "Distance Score");
    for neighbor in similar {
        println!("{:>8}  {:.6}", neighbor.user_id, neighbor.distance);
    }
}

fn print_recommendations(recommendations: &[String]) {
    println!("{}", "Recommended Movies".bold().blue());
    if recommendations.is_empty() {
        println!("No recommendations available");
        return;
    }
    for (rank, title) in recommendations.iter().enumerate() {
        println!("{}. {}", (rank + 1).to_string().green(), title);
    }
}

use anyhow::Result;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};
use tdrl_core::{
    algorithm::{MonteCarlo, OfflineSarsaLambda, OnlineSarsaLambda, Sarsa, TdAlgorithm, TdConfig},
    dummy::Corridor,
    evaluator::{DefaultEvaluator, Evaluator},
    policy::{ExplorationPolicy, PolicyConfig},
    q_table::{Initializer, QTable, QTableConfig},
    record::BufferedRecorder,
    schedule::ScheduleConfig,
    trainer::{Trainer, TrainerConfig},
};

const LENGTH: usize = 10;
const GOAL_REWARD: f32 = 1.0;
const STEP_REWARD: f32 = -0.01;
const N_EPISODES_PER_EVAL: usize = 1;

type Q = QTable<usize>;
type Policy = ExplorationPolicy<usize>;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algo {
    Sarsa,
    MonteCarlo,
    OfflineSarsaLambda,
    OnlineSarsaLambda,
}

/// Learn to walk a corridor with tabular TD control
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Learning algorithm
    #[arg(short, long, value_enum, default_value_t = Algo::Sarsa)]
    algo: Algo,

    /// Load the configuration from a YAML file
    #[arg(short, long)]
    config: Option<String>,

    /// Save the configuration used to a YAML file
    #[arg(short, long)]
    save_config: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
struct CorridorConfig {
    td_config: TdConfig,
    decay: f32,
    q_table_config: QTableConfig,
    learning_rate: ScheduleConfig,
    policy_config: PolicyConfig,
    trainer_config: TrainerConfig,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            td_config: TdConfig::default().discount(0.95).episode_length(200),
            decay: 0.8,
            q_table_config: QTableConfig::default().initializer(Initializer::Zeros),
            learning_rate: ScheduleConfig::Constant { value: 0.2 },
            policy_config: PolicyConfig::EpsilonGreedy {
                epsilon: ScheduleConfig::Linear {
                    start: 0.5,
                    end: 0.0,
                    episodes: 400,
                },
                seed: 42,
            },
            trainer_config: TrainerConfig::default()
                .episodes(500)
                .trials(3)
                .record_interval(1)
                .flush_record_interval(100)
                .eval_interval(100),
        }
    }
}

impl CorridorConfig {
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

fn run<A>(algo: &mut A, config: &CorridorConfig) -> Result<()>
where
    A: TdAlgorithm<Corridor, Q, Policy>,
{
    let mut task = Corridor::new(LENGTH, GOAL_REWARD, STEP_REWARD);
    let mut q = Q::build(&config.q_table_config, 2, config.learning_rate.build())?;
    let mut policy = config.policy_config.build();

    // A single recorded trial
    let mut recorder = BufferedRecorder::new();
    let mut evaluator = DefaultEvaluator::new(
        Corridor::new(LENGTH, GOAL_REWARD, STEP_REWARD),
        N_EPISODES_PER_EVAL,
        config.td_config.episode_length,
        config.td_config.discount,
    )?;
    let mut trainer = Trainer::build(config.trainer_config.clone());
    trainer.train_with_evaluator(
        algo,
        &mut q,
        &mut task,
        &mut policy,
        &mut recorder,
        &mut evaluator,
    )?;
    for record in recorder.iter() {
        log::info!("{:?}", record);
    }
    let result = evaluator.evaluate(&mut q)?;
    println!("Greedy policy: {:?}", result);

    // Learning curve averaged over trials
    let history = trainer.train_many(algo, &mut q, &mut task, &mut policy)?;
    let n = history.len();
    for e in (0..n).step_by((n / 10).max(1)) {
        println!(
            "episode {:>5}: steps = {:>8.2}, return = {:>8.4}",
            e, history.steps[e], history.returns[e]
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => CorridorConfig::load(path)?,
        None => CorridorConfig::default(),
    };
    if let Some(path) = &args.save_config {
        config.save(path)?;
    }

    let td_config = config.td_config.clone();
    match args.algo {
        Algo::Sarsa => run(&mut Sarsa::build(td_config)?, &config),
        Algo::MonteCarlo => run(&mut MonteCarlo::build(td_config)?, &config),
        Algo::OfflineSarsaLambda => run(
            &mut OfflineSarsaLambda::build(td_config, config.decay)?,
            &config,
        ),
        Algo::OnlineSarsaLambda => run(
            &mut OnlineSarsaLambda::build(td_config, config.decay)?,
            &config,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_corridor_config() -> Result<()> {
        let tmp_dir = TempDir::new("corridor")?;
        let path = tmp_dir.path().join("corridor.yaml");
        let config = CorridorConfig::default();
        config.save(&path)?;
        assert_eq!(CorridorConfig::load(&path)?, config);
        Ok(())
    }
}

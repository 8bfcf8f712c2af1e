use anyhow::Result;
use clap::Parser;
use log::info;
use tdrl_candle_agent::{
    mlp::MlpConfig, opt::OptimizerConfig, util::CriticLoss, MlpPredictor, MlpPredictorConfig,
};
use tdrl_core::{
    algorithm::{DeepQLearning, TdConfig},
    deep_q::{DeepQ, DeepQConfig},
    dummy::Corridor,
    evaluator::DefaultEvaluator,
    policy::EpsilonGreedy,
    record::{BufferedRecorder, RecordValue, Recorder},
    replay_buffer::{ReplayBuffer, ReplayBufferConfig},
    schedule::ScheduleConfig,
    trainer::{Trainer, TrainerConfig},
};

const LENGTH: usize = 8;
const GOAL_REWARD: f32 = 1.0;
const STEP_REWARD: f32 = 0.0;
const DISCOUNT: f32 = 0.95;
const EPISODE_LENGTH: usize = 100;
const LR: f64 = 0.001;
const BATCH_SIZE: usize = 32;
const REPLAY_BUFFER_CAPACITY: usize = 10000;
const EVAL_INTERVAL: usize = 50;
const N_EPISODES_PER_EVAL: usize = 1;

/// Train a DQN agent in a corridor
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Use double DQN
    #[arg(short, long, default_value_t = false)]
    double: bool,

    /// Number of training episodes
    #[arg(short, long, default_value_t = 500)]
    episodes: usize,

    /// Save the parameters of the trained network in the safetensors format
    #[arg(short, long)]
    model_path: Option<String>,
}

fn encode(state: &usize) -> Vec<f32> {
    tdrl_core::util::one_hot(LENGTH, *state)
}

fn create_network_config() -> MlpPredictorConfig {
    MlpPredictorConfig::default()
        .mlp_config(MlpConfig::new(LENGTH, vec![64, 64], 2, false))
        .opt_config(OptimizerConfig::default().learning_rate(LR))
        .critic_loss(CriticLoss::SmoothL1)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let network = MlpPredictor::build(create_network_config())?;
    let mut q = DeepQ::build(DeepQConfig::default().double(args.double), network)?;
    let epsilon = ScheduleConfig::Exponential {
        start: 1.0,
        decay: 0.99,
        min: 0.05,
    };
    let mut policy = EpsilonGreedy::with_schedule(epsilon.build(), 42);
    let memory = {
        let config = ReplayBufferConfig::default()
            .capacity(REPLAY_BUFFER_CAPACITY)
            .batch_size(BATCH_SIZE);
        ReplayBuffer::build(&config)?
    };
    let td_config = TdConfig::default()
        .discount(DISCOUNT)
        .episode_length(EPISODE_LENGTH);
    let mut algo = DeepQLearning::build(td_config, encode, memory)?;

    let mut task = Corridor::new(LENGTH, GOAL_REWARD, STEP_REWARD);
    let mut evaluator = {
        let task = Corridor::new(LENGTH, GOAL_REWARD, STEP_REWARD);
        DefaultEvaluator::with_encoder(
            task,
            encode,
            N_EPISODES_PER_EVAL,
            EPISODE_LENGTH,
            DISCOUNT,
        )?
    };
    let mut recorder = BufferedRecorder::new();
    let trainer_config = TrainerConfig::default()
        .episodes(args.episodes)
        .eval_interval(EVAL_INTERVAL)
        .flush_record_interval(EVAL_INTERVAL);

    Trainer::build(trainer_config).train_with_evaluator(
        &mut algo,
        &mut q,
        &mut task,
        &mut policy,
        &mut recorder,
        &mut evaluator,
    )?;

    let mut stats = q.target_network().param_stats()?;
    stats.insert("episode", RecordValue::Scalar(args.episodes as f32));
    recorder.write(stats);
    for record in recorder.iter() {
        info!("{:?}", record);
    }

    if let Some(path) = &args.model_path {
        q.target_network().save(path)?;
    }

    Ok(())
}

use anyhow::Result;
use tdrl_core::{
    algorithm::{
        MonteCarlo, OfflineSarsaLambda, OnlineSarsaLambda, Sarsa, TdAlgorithm, TdConfig,
    },
    dummy::{Bandit, Corridor},
    error::TdError,
    evaluator::{DefaultEvaluator, Evaluator},
    policy::{EpsilonGreedy, Greedy},
    q_table::{Initializer, QTable, QTableConfig},
    record::BufferedRecorder,
    schedule::Schedule,
    trainer::{Trainer, TrainerConfig},
};

const DISCOUNT: f32 = 0.9;
const EPISODE_LENGTH: usize = 100;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn td_config() -> TdConfig {
    TdConfig::default()
        .discount(DISCOUNT)
        .episode_length(EPISODE_LENGTH)
}

fn q_table(alpha: f32, initializer: Initializer) -> Result<QTable<usize>> {
    let config = QTableConfig::default().initializer(initializer);
    QTable::build(&config, 2, Schedule::constant(alpha))
}

/// A table preferring to move right at cells 0 and 1 of a three-cell corridor.
fn right_biased_table() -> Result<QTable<usize>> {
    let mut q = q_table(0.5, Initializer::Zeros)?;
    q.update_all(&0, &[0.0, 1.0]);
    q.update_all(&1, &[0.0, 1.0]);
    Ok(q)
}

fn assert_close(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-6, "{} != {}", a, b);
}

fn is_invalid<T>(result: Result<T>) -> bool {
    match result {
        Ok(_) => false,
        Err(e) => matches!(e.downcast_ref::<TdError>(), Some(TdError::InvalidConfig(_))),
    }
}

#[test]
fn test_sarsa_single_episode() -> Result<()> {
    let mut q = right_biased_table()?;
    let mut task = Corridor::new(3, 1.0, 0.0);
    let mut sarsa = Sarsa::build(td_config())?;

    let episode = sarsa.run_episode(&mut q, &mut task, &mut Greedy)?;
    assert_eq!(episode.steps, 2);
    assert_eq!(episode.rewards, vec![0.0, 1.0]);
    // 0.5 + 0.5 * (0 + 0.9 * 0.5 - 0.5) and 0.5 + 0.5 * (1 + 0.9 * 0 - 0.5)
    assert_close(q.value(&0, 1), 0.475);
    assert_close(q.value(&1, 1), 0.75);
    Ok(())
}

#[test]
fn test_monte_carlo_single_episode() -> Result<()> {
    let mut q = right_biased_table()?;
    let mut task = Corridor::new(3, 1.0, 0.0);
    let mut mc = MonteCarlo::build(td_config())?;

    let episode = mc.run_episode(&mut q, &mut task, &mut Greedy)?;
    assert_eq!(episode.steps, 2);
    assert_close(q.value(&1, 1), 0.75);
    assert_close(q.value(&0, 1), 0.7);
    Ok(())
}

#[test]
fn test_offline_sarsa_lambda_single_episode() -> Result<()> {
    let mut q = right_biased_table()?;
    let mut task = Corridor::new(3, 1.0, 0.0);
    let mut algo = OfflineSarsaLambda::build(td_config(), 0.5)?;

    algo.run_episode(&mut q, &mut task, &mut Greedy)?;
    assert_close(q.value(&1, 1), 0.75);
    // G = 0.9 * (0.5 * 0.75 + 0.5 * 1.0) = 0.7875
    assert_close(q.value(&0, 1), 0.5 + 0.5 * (0.7875 - 0.5));
    Ok(())
}

#[test]
fn test_episode_truncated_at_episode_length() -> Result<()> {
    let mut q = q_table(0.5, Initializer::Zeros)?;
    let mut task = Corridor::new(10, 1.0, -1.0);
    let mut sarsa = Sarsa::build(td_config().episode_length(7))?;

    // Greedy ties select action 0, which never leaves the left end.
    let episode = sarsa.run_episode(&mut q, &mut task, &mut Greedy)?;
    assert_eq!(episode.steps, 7);
    assert_eq!(episode.rewards, vec![-1.0; 7]);
    Ok(())
}

#[test]
fn test_online_sarsa_lambda_without_decay_is_sarsa() -> Result<()> {
    init_logger();
    let episodes = 50;
    let mut task = Corridor::new(6, 1.0, -0.1);

    let mut q1 = q_table(0.5, Initializer::Zeros)?;
    let mut policy1 = EpsilonGreedy::new(0.2, 7);
    let mut sarsa = Sarsa::build(td_config())?;
    let h1 = sarsa.train(&mut q1, &mut task, &mut policy1, episodes)?;

    let mut q2 = q_table(0.5, Initializer::Zeros)?;
    let mut policy2 = EpsilonGreedy::new(0.2, 7);
    let mut online = OnlineSarsaLambda::build(td_config(), 0.0)?;
    let h2 = online.train(&mut q2, &mut task, &mut policy2, episodes)?;

    assert_eq!(h1, h2);
    for s in 0..6 {
        assert_eq!(q1.values(&s), q2.values(&s));
    }
    Ok(())
}

#[test]
fn test_monte_carlo_bandit_prefers_rewarding_action() -> Result<()> {
    init_logger();
    let mut task = Bandit::new(vec![1.0, 0.0]);
    let mut q = q_table(0.1, Initializer::Zeros)?;
    let epsilon = Schedule::new(|e| (1.0 - e as f32 / 200.0).max(0.05));
    let mut policy = EpsilonGreedy::with_schedule(epsilon, 42);
    let mut mc = MonteCarlo::build(td_config())?;

    let history = mc.train(&mut q, &mut task, &mut policy, 500)?;
    assert_eq!(history.steps, vec![1.0; 500]);
    assert!(q.value(&0, 0) > q.value(&0, 1));
    assert_eq!(q.max_action(&0), 0);
    Ok(())
}

#[test]
fn test_action_count_mismatch_is_rejected() -> Result<()> {
    // Three arms against a table of two actions.
    let mut task = Bandit::new(vec![0.0; 3]);
    let mut q = q_table(0.5, Initializer::Zeros)?;

    let mut sarsa = Sarsa::build(td_config())?;
    assert!(is_invalid(sarsa.run_episode(&mut q, &mut task, &mut Greedy)));
    let mut mc = MonteCarlo::build(td_config())?;
    assert!(is_invalid(mc.run_episode(&mut q, &mut task, &mut Greedy)));
    let mut offline = OfflineSarsaLambda::build(td_config(), 0.5)?;
    assert!(is_invalid(offline.run_episode(&mut q, &mut task, &mut Greedy)));
    let mut online = OnlineSarsaLambda::build(td_config(), 0.5)?;
    assert!(is_invalid(online.run_episode(&mut q, &mut task, &mut Greedy)));
    assert!(q.is_empty());
    Ok(())
}

#[test]
fn test_train_many_single_trial_equals_train() -> Result<()> {
    let run = |trials: Option<usize>| -> Result<_> {
        let mut task = Corridor::new(5, 1.0, 0.0);
        let mut q = q_table(0.3, Initializer::Constant(1.0))?;
        let mut policy = EpsilonGreedy::new(0.3, 11);
        let mut sarsa = Sarsa::build(td_config())?;
        match trials {
            None => sarsa.train(&mut q, &mut task, &mut policy, 30),
            Some(trials) => sarsa.train_many(&mut q, &mut task, &mut policy, 30, trials),
        }
    };

    let h1 = run(None)?;
    let h2 = run(Some(1))?;
    assert_eq!(h1.len(), 30);
    assert_eq!(h1, h2);
    assert!(run(Some(0)).is_err());
    Ok(())
}

/// Explores for 200 episodes, then acts greedily.
fn exploration(seed: u64) -> EpsilonGreedy {
    EpsilonGreedy::with_schedule(Schedule::new(|e| if e < 200 { 0.1 } else { 0.0 }), seed)
}

#[test]
fn test_tabular_algorithms_solve_corridor() -> Result<()> {
    init_logger();
    let mut task = Corridor::new(5, 1.0, 0.0);
    let mut evaluator = DefaultEvaluator::new(task.clone(), 1, EPISODE_LENGTH, DISCOUNT)?;

    let mut q = q_table(0.5, Initializer::Constant(1.0))?;
    let mut sarsa = Sarsa::build(td_config())?;
    sarsa.train(&mut q, &mut task, &mut exploration(1), 300)?;
    assert_eq!(evaluator.evaluate(&mut q)?.get_scalar("episode_steps")?, 4.0);

    let mut q = q_table(0.3, Initializer::Constant(1.0))?;
    let mut online = OnlineSarsaLambda::build(td_config(), 0.5)?;
    online.train(&mut q, &mut task, &mut exploration(2), 300)?;
    assert_eq!(evaluator.evaluate(&mut q)?.get_scalar("episode_steps")?, 4.0);
    Ok(())
}

#[test]
fn test_trainer_records() -> Result<()> {
    init_logger();
    let mut task = Corridor::new(5, 1.0, 0.0);
    let mut q = q_table(0.5, Initializer::Constant(1.0))?;
    let mut policy = EpsilonGreedy::new(0.1, 3);
    let mut sarsa = Sarsa::build(td_config())?;
    let mut evaluator = DefaultEvaluator::new(task.clone(), 1, EPISODE_LENGTH, DISCOUNT)?;
    let mut recorder = BufferedRecorder::new();

    let config = TrainerConfig::default()
        .episodes(200)
        .record_interval(2)
        .flush_record_interval(50)
        .eval_interval(50);
    let history = Trainer::build(config).train_with_evaluator(
        &mut sarsa,
        &mut q,
        &mut task,
        &mut policy,
        &mut recorder,
        &mut evaluator,
    )?;

    assert_eq!(history.len(), 200);
    assert_eq!(recorder.len(), 4);
    for (i, record) in recorder.iter().enumerate() {
        assert_eq!(record.get_scalar("episode")?, (50 * i + 49) as f32);
        // Episodes 1, 3, .., 49 of the window.
        assert_eq!(record.get_scalar("episode_min")?, (50 * i + 1) as f32);
        assert!(record.get_scalar("return_mean").is_ok());
        assert!(record.get_scalar("episode_return").is_ok());
    }
    Ok(())
}

//! Train action-value functions with [`TdAlgorithm`]s.
mod config;
mod history;
use crate::{
    algorithm::TdAlgorithm,
    error::TdError,
    evaluator::Evaluator,
    record::{NullRecorder, Record, RecordValue::Scalar, Recorder},
    util::discounted_return,
    Episodic, Task,
};
use anyhow::Result;
pub use config::TrainerConfig;
pub use history::History;
use log::{debug, info};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the training loop.
///
/// # Training loop
///
/// A trial, run by [`Trainer::train`], looks like following:
///
/// 0. Given an algorithm implementing [`TdAlgorithm`], a value function, a task and
///    an exploration policy.
/// 1. Reset the algorithm, the value function and the policy with
///    [`TdAlgorithm::clear`] and [`Episodic::clear`].
/// 2. For each episode `e = 0, 1, ..`:
///     1. Run the episode with [`TdAlgorithm::run_episode`].
///     2. Compute the discounted return `R = sum_t gamma^t r_t` and push `R` and the
///        number of steps to the [`History`].
///     3. Call [`Episodic::finish_episode`] of the policy, then of the value function.
///     4. If `(e + 1) % eval_interval == 0`, evaluate the value function.
///     5. If `(e + 1) % record_interval == 0`, store the record of the episode
///        (`"episode"`, `"steps"`, `"return"`, the algorithm's own record and the
///        evaluation result) in the recorder.
///     6. If `(e + 1) % flush_record_interval == 0`, flush the recorder.
/// 3. Flush the recorder.
///
/// [`Trainer::train_many`] repeats trials and averages their histories elementwise.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[TdAlgorithm]-->|act|B[Policy]
///     B -->|values|C[QFunction]
///     A -->|transition|D[Task]
///     A -->|update / train|C
///     A -->|Episode|E[Trainer]
///     E -->|Record|F[Recorder]
/// ```
pub struct Trainer {
    config: TrainerConfig,
}

impl Trainer {
    /// Constructs a trainer.
    pub fn build(config: TrainerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Runs a single trial.
    pub fn train<T, Q, P, A>(
        &mut self,
        algo: &mut A,
        q: &mut Q,
        task: &mut T,
        policy: &mut P,
    ) -> Result<History>
    where
        T: Task,
        Q: Episodic,
        P: Episodic,
        A: TdAlgorithm<T, Q, P>,
    {
        self.run_trial(algo, q, task, policy, &mut NullRecorder, None)
    }

    /// Runs a single trial, storing episode records in `recorder`.
    pub fn train_with_recorder<T, Q, P, A>(
        &mut self,
        algo: &mut A,
        q: &mut Q,
        task: &mut T,
        policy: &mut P,
        recorder: &mut dyn Recorder,
    ) -> Result<History>
    where
        T: Task,
        Q: Episodic,
        P: Episodic,
        A: TdAlgorithm<T, Q, P>,
    {
        self.run_trial(algo, q, task, policy, recorder, None)
    }

    /// Runs a single trial, evaluating the value function every `eval_interval` episodes.
    pub fn train_with_evaluator<T, Q, P, A>(
        &mut self,
        algo: &mut A,
        q: &mut Q,
        task: &mut T,
        policy: &mut P,
        recorder: &mut dyn Recorder,
        evaluator: &mut dyn Evaluator<Q>,
    ) -> Result<History>
    where
        T: Task,
        Q: Episodic,
        P: Episodic,
        A: TdAlgorithm<T, Q, P>,
    {
        self.run_trial(algo, q, task, policy, recorder, Some(evaluator))
    }

    /// Runs `trials` independent trials and averages their histories elementwise.
    ///
    /// Every trial starts by resetting the algorithm, the value function and the policy.
    pub fn train_many<T, Q, P, A>(
        &mut self,
        algo: &mut A,
        q: &mut Q,
        task: &mut T,
        policy: &mut P,
    ) -> Result<History>
    where
        T: Task,
        Q: Episodic,
        P: Episodic,
        A: TdAlgorithm<T, Q, P>,
    {
        let trials = self.config.trials;
        if trials == 0 {
            return Err(TdError::InvalidConfig("trials must be positive".to_string()).into());
        }

        let mut histories = Vec::with_capacity(trials);
        for trial in 0..trials {
            let history = self.train(algo, q, task, policy)?;
            info!(
                "Trial {}/{}: mean return = {}",
                trial + 1,
                trials,
                history.mean_return()
            );
            histories.push(history);
        }
        Ok(History::average(&histories))
    }

    fn run_trial<T, Q, P, A>(
        &self,
        algo: &mut A,
        q: &mut Q,
        task: &mut T,
        policy: &mut P,
        recorder: &mut dyn Recorder,
        mut evaluator: Option<&mut dyn Evaluator<Q>>,
    ) -> Result<History>
    where
        T: Task,
        Q: Episodic,
        P: Episodic,
        A: TdAlgorithm<T, Q, P>,
    {
        let config = &self.config;
        let gamma = algo.discount();
        algo.clear()?;
        q.clear()?;
        policy.clear()?;

        let mut history = History::with_capacity(config.episodes);
        for e in 0..config.episodes {
            let episode = algo.run_episode(q, task, policy)?;
            let ret = discounted_return(&episode.rewards, gamma);
            history.push(episode.steps as f32, ret);
            debug!("Episode {}: steps = {}, return = {}", e, episode.steps, ret);

            policy.finish_episode(e)?;
            q.finish_episode(e)?;

            let n = e + 1;
            let mut record = Record::from_slice(&[
                ("episode", Scalar(e as f32)),
                ("steps", Scalar(episode.steps as f32)),
                ("return", Scalar(ret)),
            ])
            .merge(episode.record);

            if let Some(evaluator) = evaluator.as_mut() {
                if config.eval_interval > 0 && n % config.eval_interval == 0 {
                    let result = evaluator.evaluate(q)?;
                    info!("Evaluation at episode {}: {:?}", e, result);
                    record.merge_inplace(result);
                }
            }

            if config.record_interval > 0 && n % config.record_interval == 0 {
                recorder.store(record);
            }
            if config.flush_record_interval > 0 && n % config.flush_record_interval == 0 {
                recorder.flush(e);
            }
        }
        recorder.flush(config.episodes);

        Ok(history)
    }
}

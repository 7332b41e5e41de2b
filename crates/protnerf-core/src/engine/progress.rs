#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    BatchStart { total_chains: u64 },
    ChainFinished { id: String, atoms: usize },
    ChainFailed { id: String, reason: String },
    BatchFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_silent() {
        ProgressReporter::new().report(Progress::BatchFinish);
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            seen.lock().unwrap().push(event);
        }));

        reporter.report(Progress::BatchStart { total_chains: 2 });
        reporter.report(Progress::BatchFinish);
        drop(reporter);

        assert_eq!(
            seen.into_inner().unwrap(),
            vec![Progress::BatchStart { total_chains: 2 }, Progress::BatchFinish]
        );
    }
}

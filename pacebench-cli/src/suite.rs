//! Benchmark Suite
//!
//! Groups benchmark registrations for the command-line harness. A suite only
//! holds names, argument lists and callables; every case is measured from
//! scratch when the suite runs.

use crate::runner::{Runner, RunnerError};
use pacebench_core::{Context, TypeList, TypeVisitor, TypedBench, type_label};
use pacebench_report::Record;
use regex::Regex;
use std::fmt::Display;

type CaseFn = Box<dyn FnMut(&mut Runner) -> Result<Vec<Record>, RunnerError>>;

/// Registered benchmark
struct Entry {
    name: String,
    arguments: Vec<String>,
    case: CaseFn,
}

/// Ordered collection of benchmarks
#[derive(Default)]
pub struct Suite {
    entries: Vec<Entry>,
}

impl Suite {
    /// Create an empty suite
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single-case benchmark
    pub fn bench<F>(mut self, name: impl Into<String>, mut f: F) -> Self
    where
        F: FnMut(&mut Context) + 'static,
    {
        let name = name.into();
        self.entries.push(Entry {
            name: name.clone(),
            arguments: Vec::new(),
            case: Box::new(move |runner: &mut Runner| {
                runner.run_single(&name, &mut f).map(|record| vec![record])
            }),
        });
        self
    }

    /// Register a benchmark run once per argument value
    pub fn bench_with_args<A, I, F>(mut self, name: impl Into<String>, args: I, mut f: F) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Display + Clone + 'static,
        F: FnMut(&mut Context, A) + 'static,
    {
        let name = name.into();
        let args: Vec<A> = args.into_iter().collect();
        self.entries.push(Entry {
            name: name.clone(),
            arguments: args.iter().map(ToString::to_string).collect(),
            case: Box::new(move |runner: &mut Runner| {
                runner.run_parameterized(&name, args.iter().cloned(), &mut f)
            }),
        });
        self
    }

    /// Register a benchmark run once per type in `L`
    pub fn bench_typed<L, B>(mut self, name: impl Into<String>, mut bench: B) -> Self
    where
        L: TypeList + 'static,
        B: TypedBench + 'static,
    {
        let name = name.into();
        let mut names = TypeNames(Vec::with_capacity(L::LEN));
        L::for_each(&mut names);
        self.entries.push(Entry {
            name: name.clone(),
            arguments: names.0,
            case: Box::new(move |runner: &mut Runner| runner.run_typed::<L, B>(&name, &mut bench)),
        });
        self
    }

    /// Number of registered benchmarks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered benchmarks with their argument labels, in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.arguments.as_slice()))
    }

    /// Benchmarks whose name matches `filter` (all when `None`)
    pub fn matching<'a>(
        &'a self,
        filter: Option<&'a Regex>,
    ) -> impl Iterator<Item = (&'a str, &'a [String])> {
        self.iter()
            .filter(move |(name, _)| filter.is_none_or(|re| re.is_match(name)))
    }

    /// Run every matching benchmark in registration order
    pub fn run(
        &mut self,
        runner: &mut Runner,
        filter: Option<&Regex>,
    ) -> Result<Vec<Record>, RunnerError> {
        let mut records = Vec::new();
        for entry in &mut self.entries {
            if filter.is_some_and(|re| !re.is_match(&entry.name)) {
                tracing::debug!(name = %entry.name, "skipped by filter");
                continue;
            }
            records.extend((entry.case)(runner)?);
        }
        Ok(records)
    }
}

struct TypeNames(Vec<String>);

impl TypeVisitor for TypeNames {
    fn visit<T: 'static>(&mut self) {
        self.0.push(type_label::<T>().to_string());
    }
}

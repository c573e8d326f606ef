//! Pipeline orchestrator.

use eyre::Result;
use implgen_manifest::Manifest;

use super::{
    CompilationContext, Phase,
    phases::{LowerPhase, ValidatePhase},
};

/// Runs the compilation phases over a manifest.
///
/// Built-in phases (validate, lower) run first, followed by any phases
/// added with [`Pipeline::phase`].
///
/// ```ignore
/// let mut ctx = Pipeline::new().run(manifest)?;
/// let interfaces = ctx.take_interfaces()?;
/// ```
pub struct Pipeline {
    validate: ValidatePhase,
    phases: Vec<Box<dyn Phase>>,
}

impl Pipeline {
    /// Create a pipeline with the default lints.
    pub fn new() -> Self {
        Self::with_validation(ValidatePhase::new())
    }

    /// Create a pipeline with a custom validate phase.
    pub fn with_validation(validate: ValidatePhase) -> Self {
        Self {
            validate,
            phases: Vec::new(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Run every phase in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any phase fails fatally; diagnostics gathered so
    /// far are logged before returning.
    pub fn run(&self, manifest: Manifest) -> Result<CompilationContext> {
        let mut ctx = CompilationContext::new(manifest);
        self.run_phases(&mut ctx)?;
        Ok(ctx)
    }

    /// Run every phase and keep the diagnostics even when one fails.
    ///
    /// Returns the context together with the fatal error, if any.
    pub fn check(&self, manifest: Manifest) -> (CompilationContext, Option<eyre::Report>) {
        let mut ctx = CompilationContext::new(manifest);
        let err = self.run_phases(&mut ctx).err();
        (ctx, err)
    }

    fn run_phases(&self, ctx: &mut CompilationContext) -> Result<()> {
        let builtin: [&dyn Phase; 2] = [&self.validate, &LowerPhase];
        for phase in builtin
            .into_iter()
            .chain(self.phases.iter().map(|p| p.as_ref()))
        {
            tracing::debug!(phase = phase.name(), "running phase");
            if let Err(err) = phase.run(ctx) {
                for diag in ctx.errors() {
                    tracing::debug!(phase = phase.name(), "{}", diag);
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    struct CountingPhase(Arc<AtomicUsize>);

    impl Phase for CountingPhase {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn description(&self) -> &'static str {
            "Count interfaces"
        }

        fn run(&self, ctx: &mut CompilationContext) -> Result<()> {
            let count = ctx.interfaces.as_ref().map_or(0, Vec::len);
            self.0.store(count, Ordering::SeqCst);
            Ok(())
        }
    }

    fn manifest(src: &str) -> Manifest {
        src.parse().expect("valid manifest")
    }

    #[test]
    fn test_pipeline_lowers_interfaces() {
        let manifest = manifest(
            r#"
[interfaces.Service.methods.Ping]
returns = ["error"]
"#,
        );

        let mut ctx = Pipeline::new().run(manifest).expect("pipeline should succeed");
        let interfaces = ctx.take_interfaces().unwrap();
        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces[0].methods[0].name, "Ping");
    }

    #[test]
    fn test_user_phases_run_after_lowering() {
        let seen = Arc::new(AtomicUsize::new(0));
        let manifest = manifest("[interfaces.A]\n[interfaces.B]\n");

        Pipeline::new()
            .phase(CountingPhase(seen.clone()))
            .run(manifest)
            .expect("pipeline should succeed");

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_pipeline_stops_on_lint_errors() {
        let manifest = manifest(
            r#"
[names]
A = "Shared"
B = "Shared"

[interfaces.A]
[interfaces.B]
"#,
        );

        assert!(Pipeline::new().run(manifest).is_err());
    }

    #[test]
    fn test_check_keeps_diagnostics() {
        let manifest = manifest(
            r#"
[names]
A = "Shared"
B = "Shared"

[interfaces.A]
[interfaces.B]
"#,
        );

        let (ctx, err) = Pipeline::new().check(manifest);
        assert!(err.is_some());
        assert!(ctx.has_errors());
        assert!(ctx.interfaces.is_none());
    }
}

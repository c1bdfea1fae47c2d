//! Lesson-plan generator implementation

mod generator;

pub use generator::{
    GeneratorConfig, LessonPlanGenerator, LessonPlanGeneratorTrait, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};

#[cfg(test)]
pub use generator::mock::MockLessonPlanGenerator;

mod practice_vm;
mod timer_vm;

pub use practice_vm::{
    ParagraphMark, ParagraphVm, PracticeVm, QuestionVm, ResultVm, map_practice,
};
pub use timer_vm::{TimerTone, TimerVm, format_clock};

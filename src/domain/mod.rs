pub mod date_view;
pub mod entry;
pub mod figure;
pub mod journal;
pub mod stem;

pub use date_view::{CalendarPolicy, DateView, DateWindow, StepDirection};
pub use entry::{ChildEntry, JournalEntry};
pub use figure::{ConversionSource, Figure, FigureEnumeration};
pub use journal::Journal;
pub use stem::{RecurrenceEnd, RecurrenceRule, Stem, TimeInterval, TimeUnit};

pub use scaffold::{Scaffold, ScaffoldComparer, ScaffoldContig};

mod scaffold;

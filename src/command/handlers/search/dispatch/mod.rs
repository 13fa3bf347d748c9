mod fanout;
mod traits;


pub use fanout::FanoutExecutor;
pub use traits::QueryExecutor;

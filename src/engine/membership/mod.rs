pub mod refresher;


pub use refresher::MembershipRefresher;

mod about;
mod not_found;
mod theory;

pub use about::AboutPage;
pub use not_found::NotFoundPage;
pub use theory::TheoryPage;

pub mod multivariate;
pub mod panels;
pub mod univariate;

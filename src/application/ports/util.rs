// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

impl<F> SlugGenerator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn slugify(&self, input: &str) -> String {
        self(input)
    }
}

use crate::application::ports::util::SlugGenerator;
use slug::slugify;

#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input)
    }
}

/// Same transliteration as [`DefaultSlugGenerator`], joined with underscores.
#[derive(Default, Clone)]
pub struct UnderscoreSlugGenerator;

impl SlugGenerator for UnderscoreSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        slugify(input).replace('-', "_")
    }
}

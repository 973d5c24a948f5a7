use fantasy_namegen::entities::generation::GenerationRequest;
use fantasy_namegen::service::models::{ModelError, SamplingRequest, TextSampler};
use fantasy_namegen::service::names::{is_affixed_name, NameGenerator, NameSource, Rejection};
use mockall::mock;
use std::sync::Arc;

mock! {
    pub Sampler {}
    impl TextSampler for Sampler {
        fn sample(&self, prompt: &str, request: &SamplingRequest) -> Result<String, ModelError>;
    }
}

const PROMPT: &str = "Single elf name, no spaces: ";

fn generator_returning(raw: &'static str) -> NameGenerator {
    let mut sampler = MockSampler::new();
    sampler.expect_sample().returning(move |_, _| Ok(raw.to_string()));
    NameGenerator::with_sampler(Arc::new(sampler))
}

#[test]
fn test_no_model_uses_rule_based_names() {
    let generator = NameGenerator::rule_based_only();
    assert!(!generator.has_model());

    for use_flare in [true, false] {
        let request = GenerationRequest::new(PROMPT, 0.7, 42, use_flare);
        let generated = generator.generate_detailed(&request);
        assert_eq!(generated.source, NameSource::RuleBasedOnly);
        assert!(is_affixed_name(&generated.name), "unexpected name: {}", generated.name);
        assert!(!generated.name.contains(char::is_whitespace));
    }
}

#[test]
fn test_sampler_receives_request_parameters() {
    let mut sampler = MockSampler::new();
    sampler
        .expect_sample()
        .withf(|prompt, request| {
            prompt == PROMPT
                && request.max_new_tokens == 8
                && request.seed == 123
                && (request.temperature - 1.2).abs() < f64::EPSILON
        })
        .times(1)
        .returning(|_, _| Ok(format!("{}Galadwen", PROMPT)));
    let generator = NameGenerator::with_sampler(Arc::new(sampler));

    let request = GenerationRequest::new(PROMPT, 1.2, 123, false);
    assert_eq!(generator.generate(&request), "Galadwen");
}

#[test]
fn test_flared_model_output_is_affixed() {
    let generator = generator_returning("Single elf name, no spaces: the Galadwen");
    let request = GenerationRequest::new(PROMPT, 0.7, 42, true);

    let generated = generator.generate_detailed(&request);
    assert_eq!(generated.source, NameSource::Model);
    assert!(is_affixed_name(&generated.name), "unexpected name: {}", generated.name);
    assert!(generated.name.contains("Galadwen"));
}

#[test]
fn test_empty_cleaned_text_falls_back() {
    let generator = generator_returning("Single elf name, no spaces: \"copyright\"");

    let raw = generator.generate_detailed(&GenerationRequest::new(PROMPT, 0.7, 42, false));
    assert_eq!(raw.source, NameSource::Rejected(Rejection::Empty));
    assert!(is_affixed_name(&raw.name));

    let flared = generator.generate_detailed(&GenerationRequest::new(PROMPT, 0.7, 42, true));
    assert_eq!(flared.source, NameSource::Rejected(Rejection::NoCandidateWords));
    assert!(!flared.name.is_empty());
}

#[test]
fn test_junk_output_falls_back() {
    let generator = generator_returning("Single elf name, no spaces: Elarion of Thornwood-2");
    let generated = generator.generate_detailed(&GenerationRequest::new(PROMPT, 0.7, 42, true));

    assert_eq!(generated.source, NameSource::Rejected(Rejection::ForbiddenCharacter));
    assert!(is_affixed_name(&generated.name));
}

#[test]
fn test_sampling_error_falls_back() {
    let mut sampler = MockSampler::new();
    sampler
        .expect_sample()
        .returning(|_, _| Err(ModelError::Tokenizer("boom".to_string())));
    let generator = NameGenerator::with_sampler(Arc::new(sampler));

    let generated = generator.generate_detailed(&GenerationRequest::new(PROMPT, 0.7, 42, true));
    assert!(matches!(generated.source, NameSource::SamplingFailed(_)));
    assert!(is_affixed_name(&generated.name));
}

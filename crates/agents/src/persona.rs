//! Persona dispatch table — one static persona per domain.
//!
//! Because `Domain` is a closed enum the lookup is an exhaustive match:
//! there is no runtime "unknown domain" case to fall back from.

use switchboard_core::domain::Domain;

/// A persona's prompt ingredients: the preamble that opens every prompt and
/// optional background text injected for internal use only.
#[derive(Debug, Clone, Copy)]
pub struct Persona {
    pub preamble: &'static str,
    pub background: Option<&'static str>,
}

const CONCORDIA_PERSONA: Persona = Persona {
    preamble: "You are an expert in Concordia University Computer Science Admissions. \
               You can answer questions, provide information, and assist with various tasks \
               related to the program structure, admission criteria, co-op opportunities, \
               and career outcomes.",
    background: None,
};

const AI_PERSONA: Persona = Persona {
    preamble: "You are an expert in Artificial Intelligence with deep knowledge across theory, \
               research, and practical applications. Use the following background information \
               for internal context to provide a clear, detailed, and accurate answer to any \
               AI-related questions, but do not include the background text verbatim in your \
               final response.",
    background: Some(AI_BACKGROUND),
};

const GENERAL_PERSONA: Persona = Persona {
    preamble: "You are a helpful AI assistant that provides accurate, concise, and relevant \
               information on a wide range of topics.",
    background: None,
};

const AI_BACKGROUND: &str = "\
- Artificial Intelligence (AI) is a broad field of computer science dedicated to building \
systems that perform tasks normally requiring human intelligence: learning, reasoning, \
problem-solving, perception, and language understanding.
- The field began with symbolic, rule-based systems in the 1950s and evolved through \
statistical methods toward modern machine learning, particularly deep learning with \
multi-layered neural networks trained on large datasets.
- Key subfields: Machine Learning (supervised, unsupervised, and reinforcement learning), \
Natural Language Processing (chatbots, translation, sentiment analysis), Computer Vision \
(image and video recognition), Robotics (autonomous decision-making), and Expert Systems \
(knowledge bases with inference rules).
- Modern breakthroughs include transformer models, which reshaped NLP, and reinforcement \
learning milestones such as game-playing systems that surpassed human champions.
- Applications span healthcare diagnostics, fraud detection and algorithmic trading, \
autonomous vehicles, and customer service.
- Ethical considerations are central: fairness, bias, transparency, privacy, and societal \
impact, with active research into explainable AI and AI safety.";

/// Look up the persona for a domain.
pub fn persona_for(domain: Domain) -> &'static Persona {
    match domain {
        Domain::Concordia => &CONCORDIA_PERSONA,
        Domain::Ai => &AI_PERSONA,
        Domain::General => &GENERAL_PERSONA,
    }
}

use super::examples::worked_example;
use super::Register;

const RESPONSE_SCHEMA: &str = r#"{
  "english": "",
  "japanese": [{
    "word": "",
    "reading": ""
  }],
  "grammarBreakdown": [{
    "english": "",
    "japanese": [{
      "word": "",
      "reading": ""
    }],
    "chunks": [{
      "japanese": [{
        "word": "",
        "reading": ""
      }],
      "meaning": "",
      "grammar": ""
    }]
  }]
}"#;

/// Build the one-shot prompt for `question`, embedding the worked example
/// for `register` as literal JSON.
pub fn build_prompt(question: &str, register: Register) -> String {
    let example = worked_example(register);

    format!(
        "You are a Japanese language teacher.\n\
         Your student asks you how to say something from english to japanese.\n\
         You should respond with:\n\
         - english: the english version ex: \"Do you live in Japan?\"\n\
         - japanese: the japanese translation in split into words ex: {japanese}\n\
         - grammarBreakdown: an explanation of the grammar structure per sentence ex: {breakdown}\n\
         \n\
         You always respond with a JSON object with the following format:\n\
         {schema}\n\
         \n\
         Question: How to say \"{question}\" in Japanese in {register} speech?",
        japanese = example.japanese_json(),
        breakdown = example.grammar_breakdown_json(),
        schema = RESPONSE_SCHEMA,
        question = question,
        register = register,
    )
}

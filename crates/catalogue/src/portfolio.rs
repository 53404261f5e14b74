use folio_chat_model::TopicKey;

use crate::Catalogue;

const WELCOME: &str = "💡 I'm a junior data scientist – try the quick action \
    buttons to see sample projects, skills, or contact info.";

const FALLBACK: &str = "Thanks for your question! I'm a junior data \
    scientist — I can answer basic questions about my projects and skills. \
    Try the quick action buttons above or ask for notebooks and code \
    examples. 😊";

pub fn catalogue() -> Catalogue {
    Catalogue::new(WELCOME, FALLBACK)
        .with_topic(
            TopicKey::Experience,
            "Tell me about your experience",
            "I'm a junior data scientist with about 1 year of hands-on \
             experience working on predictive modeling, data cleaning, and \
             exploratory analysis. I've completed several projects and \
             internships where I built prototypes, ran experiments, and \
             produced model evaluation reports.",
        )
        .with_topic(
            TopicKey::Skills,
            "What are your key skills?",
            "Core skills: Python, pandas, scikit-learn, basic \
             TensorFlow/PyTorch, SQL, and Git. Familiar with feature \
             engineering, model evaluation, and containerization using \
             Docker. Currently learning MLOps and cloud deployment practices.",
        )
        .with_topic(
            TopicKey::Projects,
            "Show me some of your projects",
            "Selected projects: 🔮 Customer Churn Prediction (capstone), 🖼️ \
             Transfer-learning Image Classifier, 📊 Time-series Forecasting \
             demo, and several exploratory notebooks. See the Projects page \
             for notebooks and code samples.",
        )
        .with_topic(
            TopicKey::Contact,
            "How can I contact you?",
            "You can reach out at 📧 sahabajalam@yahoo.com or via LinkedIn: \
             https://www.linkedin.com/in/sahabajalam/. I'm open to \
             mentorship, internships, and entry-level roles.",
        )
}

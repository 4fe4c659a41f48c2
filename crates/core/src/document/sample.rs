//! The demonstration page seeded into a fresh store.

use chrono::Utc;

use super::id::{DocumentId, ItemId, SectionId};
use super::model::{Document, FormConfig, FormField, ThankYouPage, Theme};
use crate::section::content::{
    FeatureItem, FeaturesContent, FormContent, HeroContent, Section, SectionContent, Testimonial,
    TestimonialsContent,
};

fn feature(id: &str, title: &str, description: &str, icon: &str) -> FeatureItem {
    FeatureItem {
        id: ItemId::from(id),
        title: title.into(),
        description: description.into(),
        icon: icon.into(),
    }
}

fn testimonial(id: &str, name: &str, role: &str, quote: &str, seed: &str) -> Testimonial {
    Testimonial {
        id: ItemId::from(id),
        name: name.into(),
        role: role.into(),
        quote: quote.into(),
        avatar: Some(format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")),
    }
}

pub fn sample_document() -> Document {
    Document {
        id: DocumentId::from("lp1"),
        name: "דף נחיתה לדוגמה".into(),
        description: Some("קורס שיווק דיגיטלי למתחילים".into()),
        theme: Theme::default(),
        sections: vec![
            Section {
                id: SectionId::from("hero1"),
                content: SectionContent::Hero(HeroContent {
                    headline: "הפוך למקצוען שיווק דיגיטלי ב-30 יום".into(),
                    subheadline: "הצטרף לקורס המקיף ביותר בישראל ולמד איך להביא לקוחות אמיתיים."
                        .into(),
                    image_url: "https://images.unsplash.com/photo-1552664730-d307ca884978?auto=format&fit=crop&q=80&w=2940".into(),
                    button_text: "הירשם עכשיו".into(),
                }),
            },
            Section {
                id: SectionId::from("feat1"),
                content: SectionContent::Features(FeaturesContent {
                    features: vec![
                        feature("f1", "לימוד מעשי", "תרגול על פרויקטים אמיתיים", "check"),
                        feature("f2", "ליווי אישי", "מנטור צמוד לכל סטודנט", "users"),
                        feature("f3", "השמה לעבודה", "עזרה במציאת עבודה בסיום", "briefcase"),
                    ],
                }),
            },
            Section {
                id: SectionId::from("test1"),
                content: SectionContent::Testimonials(TestimonialsContent {
                    testimonials: vec![
                        testimonial(
                            "t1",
                            "דני רופ",
                            "בוגר מחזור א׳",
                            "הקורס שינה לי את הקריירה מקצה לקצה!",
                            "Felix",
                        ),
                        testimonial(
                            "t2",
                            "שרה לוי",
                            "בעלת עסק",
                            "סוף סוף אני יודעת איך לשווק את העסק שלי לבד.",
                            "Aneka",
                        ),
                    ],
                }),
            },
            Section {
                id: SectionId::from("form1"),
                content: SectionContent::Form(FormContent {
                    headline: "מוכנים להתחיל?".into(),
                    subheadline: "השאירו פרטים ונחזור אליכם עם סילבוס מלא".into(),
                }),
            },
        ],
        form_config: FormConfig {
            title: "טופס הרשמה".into(),
            fields: vec![FormField::Name, FormField::Phone, FormField::Email],
            button_text: "שלח פרטים".into(),
        },
        thank_you_page: ThankYouPage {
            title: "תודה שנרשמת!".into(),
            message: "קיבלנו את הפרטים שלך, נציג יחזור אליך בהקדם.".into(),
        },
        published: true,
        created_at: Some(Utc::now()),
    }
}

use crate::{NewParty, NewVoter};

/// Reference voter set used by `evm voters populate`
pub fn sample_voters() -> Vec<NewVoter> {
    [
        (
            "1",
            "Narendra Modi",
            "https://res.cloudinary.com/dbs6hvga4/image/upload/v1730199397/WhatsApp_Image_2024-10-29_at_16.14.31_8f4fefb5_fybtcu.jpg",
        ),
        (
            "2",
            "Rahul Gandhi",
            "https://upload.wikimedia.org/wikipedia/commons/thumb/9/91/Rahul_Gandhi.png/330px-Rahul_Gandhi.png",
        ),
        (
            "3",
            "Bob Johnson",
            "https://res.cloudinary.com/dbs6hvga4/image/upload/v1730199397/WhatsApp_Image_2024-10-29_at_16.14.31_8f4fefb5_fybtcu.jpg",
        ),
        (
            "4",
            "Kasula Raghu",
            "https://res.cloudinary.com/dbs6hvga4/image/upload/v1730202683/Screenshot_2024-10-29_172021_ctfogy.png",
        ),
        (
            "5",
            "Dr G Madhavi",
            "https://res.cloudinary.com/dbs6hvga4/image/upload/v1730202683/Screenshot_2024-10-29_172053_yrd5bv.png",
        ),
        (
            "6",
            "Dr S Srinivasa Rao",
            "https://res.cloudinary.com/dbs6hvga4/image/upload/v1730202876/Screenshot_2024-10-29_172405_w1cvdu.png",
        ),
        (
            "7",
            "Dhruva Gupta",
            "https://media.licdn.com/dms/image/v2/D5603AQEPl39dPufM7g/profile-displayphoto-shrink_200_200/profile-displayphoto-shrink_200_200/0/1703523040663?e=2147483647&v=beta&t=NTXOLDM-klJ-AgXYxRZvwYtVbzvZAnyOy1QtXqqLImA",
        ),
    ]
    .into_iter()
    .map(|(id, name, url)| NewVoter::new(id, name, url))
    .collect()
}

/// Party 1..3, matching the three buttons on the reference device
pub fn sample_parties() -> Vec<NewParty> {
    (1..=3)
        .map(|id| NewParty {
            id,
            name: format!("Party {id}"),
        })
        .collect()
}
